use anyhow::Result;
use chrono::Local;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum TestStatus {
    Pending,
    InProgress,
    Completed,
    Failed,
    Cancelled,
}

impl fmt::Display for TestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TestStatus::Pending => "pending",
            TestStatus::InProgress => "in-progress",
            TestStatus::Completed => "completed",
            TestStatus::Failed => "failed",
            TestStatus::Cancelled => "cancelled",
        };
        f.write_str(label)
    }
}

impl TestStatus {
    pub fn marker(self) -> &'static str {
        match self {
            TestStatus::Pending => "⏳",
            TestStatus::InProgress => "🔄",
            TestStatus::Completed => "✅",
            TestStatus::Failed => "❌",
            TestStatus::Cancelled => "🚫",
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TestRecord {
    pub test_number: u32,
    pub description: String,
    pub date: String,
    pub status: TestStatus,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub notes: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub folder: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TestTracker {
    pub current_test_number: u32,
    pub tests: Vec<TestRecord>,
    pub last_updated: String,
}

impl Default for TestTracker {
    fn default() -> Self {
        Self {
            current_test_number: 1,
            tests: Vec::new(),
            last_updated: today(),
        }
    }
}

fn today() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}

pub fn load(path: &Path) -> Result<TestTracker> {
    if !path.exists() {
        return Ok(TestTracker::default());
    }
    let content = fs::read_to_string(path)?;
    let tracker = serde_json::from_str(&content)?;
    Ok(tracker)
}

pub fn save(path: &Path, tracker: &mut TestTracker) -> Result<()> {
    tracker.last_updated = today();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(tracker)?;
    fs::write(path, json)?;
    Ok(())
}

/// Numbers always continue from the highest recorded test, even if the
/// stored counter drifted.
pub fn next_number(tracker: &TestTracker) -> u32 {
    tracker
        .tests
        .iter()
        .map(|t| t.test_number)
        .max()
        .map_or(1, |n| n + 1)
}

pub fn add_test(
    path: &Path,
    description: &str,
    status: TestStatus,
    notes: &str,
    folder: &str,
) -> Result<u32> {
    let mut tracker = load(path)?;
    let number = next_number(&tracker);

    tracker.tests.push(TestRecord {
        test_number: number,
        description: description.to_string(),
        date: today(),
        status,
        notes: notes.to_string(),
        folder: folder.to_string(),
    });
    tracker.current_test_number = number + 1;

    save(path, &mut tracker)?;
    Ok(number)
}

/// Returns false when no test with that number exists. Notes and folder
/// are only replaced when a non-empty value is given.
pub fn update_test(
    path: &Path,
    number: u32,
    status: TestStatus,
    notes: Option<&str>,
    folder: Option<&str>,
) -> Result<bool> {
    let mut tracker = load(path)?;

    let Some(test) = tracker.tests.iter_mut().find(|t| t.test_number == number) else {
        return Ok(false);
    };

    test.status = status;
    if let Some(notes) = notes.filter(|n| !n.is_empty()) {
        test.notes = notes.to_string();
    }
    if let Some(folder) = folder.filter(|f| !f.is_empty()) {
        test.folder = folder.to_string();
    }

    save(path, &mut tracker)?;
    Ok(true)
}
