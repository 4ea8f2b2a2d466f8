use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::{
    CoreError, CoreErrorKind, LoadWarning, Task, format_due_date, parse_due_date,
};
use crate::persistence::{LoadOutcome, PersistenceResult, TaskRecordStore};

/// Flat JSON file holding `[priority, "YYYY-MM-DD", task_object]` records.
pub struct JsonFileStore {
    path: PathBuf,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct TaskObject {
    #[serde(alias = "nombre")]
    name: String,
    #[serde(alias = "prioridad")]
    priority: i64,
    #[serde(alias = "fecha_vencimiento")]
    due_date: String,
    #[serde(alias = "dependencias", default)]
    dependencies: Vec<String>,
}

type PersistedRecord = (i64, String, TaskObject);

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TaskRecordStore for JsonFileStore {
    fn load_all(&self) -> PersistenceResult<LoadOutcome> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "task file absent; starting empty");
                return Ok(LoadOutcome::default());
            }
            Err(error) if error.kind() == io::ErrorKind::InvalidData => {
                return Ok(corrupt_outcome(&self.path, error.to_string()));
            }
            Err(error) => {
                return Err(storage_error_text("load_all", &self.path, error.to_string()));
            }
        };

        let outcome = decode_records(&self.path, &contents);
        tracing::debug!(
            path = %self.path.display(),
            loaded = outcome.tasks.len(),
            warnings = outcome.warnings.len(),
            "loaded task records"
        );
        Ok(outcome)
    }

    fn save_all(&self, tasks: &[Task]) -> PersistenceResult<()> {
        let records: Vec<PersistedRecord> = tasks.iter().map(encode_record).collect();
        let encoded = serde_json::to_string(&records)
            .map_err(|error| storage_error_text("save_all", &self.path, error.to_string()))?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .map_err(|error| storage_error_text("save_all", &self.path, error.to_string()))?;
        }

        fs::write(&self.path, encoded)
            .map_err(|error| storage_error_text("save_all", &self.path, error.to_string()))?;

        tracing::debug!(path = %self.path.display(), count = tasks.len(), "saved task records");
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

fn encode_record(task: &Task) -> PersistedRecord {
    let due_date = format_due_date(task.due_date);
    (
        task.priority,
        due_date.clone(),
        TaskObject {
            name: task.name.clone(),
            priority: task.priority,
            due_date,
            dependencies: task.dependencies.clone(),
        },
    )
}

fn decode_records(path: &Path, contents: &str) -> LoadOutcome {
    let entries = match serde_json::from_str::<Value>(contents) {
        Ok(Value::Array(entries)) => entries,
        Ok(other) => {
            return corrupt_outcome(
                path,
                format!("expected a JSON array, found {}", json_kind(&other)),
            );
        }
        Err(error) => return corrupt_outcome(path, error.to_string()),
    };

    let mut outcome = LoadOutcome::default();
    for (index, entry) in entries.into_iter().enumerate() {
        match decode_record(entry) {
            Ok(task) => outcome.tasks.push(task),
            Err(reason) => outcome
                .warnings
                .push(LoadWarning::MalformedRecord { index, reason }),
        }
    }
    outcome
}

fn decode_record(entry: Value) -> Result<Task, String> {
    let fields = match entry {
        Value::Array(fields) => fields,
        other => {
            return Err(format!(
                "expected a 3-element array, found {}",
                json_kind(&other)
            ));
        }
    };
    let [raw_priority, raw_due_date, raw_object]: [Value; 3] = fields
        .try_into()
        .map_err(|fields: Vec<Value>| format!("expected 3 fields, found {}", fields.len()))?;

    let priority: i64 = serde_json::from_value(raw_priority)
        .map_err(|error| format!("priority is not an integer ({error})"))?;
    let due_text: String = serde_json::from_value(raw_due_date)
        .map_err(|error| format!("due date is not text ({error})"))?;
    let due_date = parse_due_date(&due_text).map_err(|error| error.message)?;

    let object: TaskObject = serde_json::from_value(raw_object)
        .map_err(|error| format!("task object is invalid ({error})"))?;
    let object_due_date = parse_due_date(&object.due_date).map_err(|error| error.message)?;

    if object.priority != priority || object_due_date != due_date {
        return Err(format!(
            "record key ({priority}, {due_text}) disagrees with task object ({}, {})",
            object.priority, object.due_date
        ));
    }
    if object.name.trim().is_empty() {
        return Err("task name is empty".to_string());
    }

    Ok(Task {
        name: object.name,
        priority,
        due_date,
        dependencies: object.dependencies,
    })
}

fn corrupt_outcome(path: &Path, reason: String) -> LoadOutcome {
    LoadOutcome {
        tasks: Vec::new(),
        warnings: vec![LoadWarning::CorruptStore {
            path: path.to_path_buf(),
            reason,
        }],
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn storage_error_text(operation: &str, path: &Path, message: impl AsRef<str>) -> CoreError {
    CoreError {
        kind: CoreErrorKind::StorageFailure,
        task: None,
        message: format!(
            "json store '{operation}' failed for '{}': {}",
            path.display(),
            message.as_ref()
        ),
    }
}
