//! Store collaborator for user and schedule records.
//!
//! The production implementation talks to DynamoDB. Handlers depend on the
//! [`ScheduleStore`] trait so tests can substitute an in-memory double.

use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::types::{AttributeValue, KeysAndAttributes};
use aws_sdk_dynamodb::Client;
use tracing::error;

use crate::models::{Schedule, ScheduleSummary, User};
use crate::{Config, Error, Result};

/// Attributes fetched for the list operation.
const SUMMARY_PROJECTION: &str = "scheduleId, scheduleTitle, targetArea, scheduleType";

/// Key-value store operations the schedule handlers depend on.
#[async_trait]
pub trait ScheduleStore: Send + Sync {
    /// Fetch a user by id. `Ok(None)` when the record is absent or empty.
    async fn get_user(&self, user_id: &str) -> Result<Option<User>>;

    /// Fetch summaries for the given schedule ids in one round trip.
    ///
    /// Fails with [`Error::ScheduleBatchIncomplete`] when the store reports
    /// unprocessed keys or omits the responses, and with
    /// [`Error::ScheduleBatchFailed`] when the call itself fails.
    async fn batch_get_schedules(&self, schedule_ids: &[String]) -> Result<Vec<ScheduleSummary>>;

    /// Write a newly created schedule.
    async fn put_schedule(&self, schedule: &Schedule) -> Result<()>;
}

/// DynamoDB-backed store over the user/schedule table pair.
#[derive(Debug, Clone)]
pub struct DynamoStore {
    client: Client,
    user_table: String,
    schedule_table: String,
}

impl DynamoStore {
    pub fn new(client: Client, config: &Config) -> Self {
        Self {
            client,
            user_table: config.user_table.clone(),
            schedule_table: config.schedule_table.clone(),
        }
    }
}

#[async_trait]
impl ScheduleStore for DynamoStore {
    async fn get_user(&self, user_id: &str) -> Result<Option<User>> {
        let output = self
            .client
            .get_item()
            .table_name(&self.user_table)
            .key("userId", AttributeValue::S(user_id.to_string()))
            .send()
            .await
            .map_err(|e| {
                error!("user lookup failed: {}", DisplayErrorContext(&e));
                Error::UserNotFound
            })?;

        match output.item {
            Some(item) if !item.is_empty() => Ok(Some(user_from_item(&item)?)),
            _ => Ok(None),
        }
    }

    async fn batch_get_schedules(&self, schedule_ids: &[String]) -> Result<Vec<ScheduleSummary>> {
        let keys: Vec<HashMap<String, AttributeValue>> = schedule_ids
            .iter()
            .map(|id| HashMap::from([("scheduleId".to_string(), AttributeValue::S(id.clone()))]))
            .collect();

        let request = KeysAndAttributes::builder()
            .set_keys(Some(keys))
            .projection_expression(SUMMARY_PROJECTION)
            .build()
            .map_err(|e| {
                error!("schedule batch request invalid: {}", DisplayErrorContext(&e));
                Error::ScheduleBatchFailed
            })?;

        let output = self
            .client
            .batch_get_item()
            .request_items(&self.schedule_table, request)
            .send()
            .await
            .map_err(|e| {
                error!("schedule batch fetch failed: {}", DisplayErrorContext(&e));
                Error::ScheduleBatchFailed
            })?;

        let unprocessed = output
            .unprocessed_keys
            .as_ref()
            .is_some_and(|keys| !keys.is_empty());
        let Some(mut responses) = output.responses else {
            return Err(Error::ScheduleBatchIncomplete);
        };
        if unprocessed {
            return Err(Error::ScheduleBatchIncomplete);
        }

        let rows = responses.remove(&self.schedule_table).unwrap_or_default();
        rows.iter().map(summary_from_item).collect()
    }

    async fn put_schedule(&self, schedule: &Schedule) -> Result<()> {
        self.client
            .put_item()
            .table_name(&self.schedule_table)
            .set_item(Some(schedule_to_item(schedule)))
            .send()
            .await
            .map(|_| ())
            .map_err(|e| {
                let text = DisplayErrorContext(&e).to_string();
                error!("schedule write failed: {}", text);
                Error::ScheduleWrite(text)
            })
    }
}

fn attr_s(item: &HashMap<String, AttributeValue>, name: &str) -> Option<String> {
    item.get(name).and_then(|v| v.as_s().ok()).cloned()
}

/// Read a sequence-of-strings attribute stored either as a list or a set.
fn attr_string_seq(item: &HashMap<String, AttributeValue>, name: &str) -> Vec<String> {
    match item.get(name) {
        Some(AttributeValue::L(values)) => values
            .iter()
            .filter_map(|v| v.as_s().ok().cloned())
            .collect(),
        Some(AttributeValue::Ss(values)) => values.clone(),
        _ => Vec::new(),
    }
}

fn user_from_item(item: &HashMap<String, AttributeValue>) -> Result<User> {
    let user_id = attr_s(item, "userId").ok_or(Error::UserNotFound)?;
    let user_name = attr_s(item, "userName").ok_or(Error::UserNotFound)?;
    Ok(User {
        user_id,
        user_name,
        editable_schedules: attr_string_seq(item, "editableSchedules"),
    })
}

fn summary_from_item(item: &HashMap<String, AttributeValue>) -> Result<ScheduleSummary> {
    Ok(ScheduleSummary {
        schedule_id: attr_s(item, "scheduleId").ok_or(Error::ScheduleBatchFailed)?,
        schedule_title: attr_s(item, "scheduleTitle").unwrap_or_default(),
        target_area: attr_s(item, "targetArea").unwrap_or_default(),
        schedule_type: attr_s(item, "scheduleType").unwrap_or_default(),
    })
}

fn schedule_to_item(schedule: &Schedule) -> HashMap<String, AttributeValue> {
    HashMap::from([
        (
            "scheduleId".to_string(),
            AttributeValue::S(schedule.schedule_id.clone()),
        ),
        (
            "scheduleTitle".to_string(),
            AttributeValue::S(schedule.schedule_title.clone()),
        ),
        (
            "targetArea".to_string(),
            AttributeValue::S(schedule.target_area.clone()),
        ),
        (
            "ownerId".to_string(),
            AttributeValue::S(schedule.owner_id.clone()),
        ),
        (
            "editorIds".to_string(),
            AttributeValue::L(
                schedule
                    .editor_ids
                    .iter()
                    .map(|id| AttributeValue::S(id.clone()))
                    .collect(),
            ),
        ),
        (
            "scheduleType".to_string(),
            AttributeValue::S(schedule.schedule_type.as_str().to_string()),
        ),
        (
            "scheduleContent".to_string(),
            AttributeValue::M(
                schedule
                    .schedule_content
                    .iter()
                    .map(|(k, v)| (k.clone(), json_to_attr(v)))
                    .collect(),
            ),
        ),
    ])
}

/// Convert a free-form JSON value into its DynamoDB attribute form.
fn json_to_attr(value: &serde_json::Value) -> AttributeValue {
    match value {
        serde_json::Value::Null => AttributeValue::Null(true),
        serde_json::Value::Bool(b) => AttributeValue::Bool(*b),
        serde_json::Value::Number(n) => AttributeValue::N(n.to_string()),
        serde_json::Value::String(s) => AttributeValue::S(s.clone()),
        serde_json::Value::Array(values) => {
            AttributeValue::L(values.iter().map(json_to_attr).collect())
        }
        serde_json::Value::Object(map) => AttributeValue::M(
            map.iter()
                .map(|(k, v)| (k.clone(), json_to_attr(v)))
                .collect(),
        ),
    }
}
