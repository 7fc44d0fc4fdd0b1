use crate::error::CoreError;
use crate::task::Task;

/// Encode the whole collection as one compact JSON array.
pub fn encode_tasks(tasks: &[Task]) -> Result<String, CoreError> {
    Ok(serde_json::to_string(tasks)?)
}

/// Decode a collection previously written by [`encode_tasks`].
pub fn decode_tasks(data: &str) -> Result<Vec<Task>, CoreError> {
    Ok(serde_json::from_str(data)?)
}
