//! Object-created notifications that trigger an invocation.
//!
//! Only the fields the handler needs are modelled; everything else in the
//! payload is ignored.

use serde::{Deserialize, Serialize};

use crate::error::InvocationError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageEvent {
    #[serde(rename = "Records", default)]
    pub records: Vec<EventRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRecord {
    pub s3: S3Entity,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct S3Entity {
    pub bucket: BucketRef,
    pub object: ObjectRef,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BucketRef {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectRef {
    pub key: String,
}

impl StorageEvent {
    /// Event for a single object, as a notifier would send it.
    pub fn for_object(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            records: vec![EventRecord {
                s3: S3Entity {
                    bucket: BucketRef { name: bucket.into() },
                    object: ObjectRef { key: key.into() },
                },
            }],
        }
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self, InvocationError> {
        serde_json::from_slice(bytes).map_err(|e| InvocationError::Event(e.to_string()))
    }

    /// Bucket and key of the first record; later records are not processed.
    pub fn target(&self) -> Result<(&str, &str), InvocationError> {
        let record = self
            .records
            .first()
            .ok_or_else(|| InvocationError::Event("event contains no records".to_string()))?;
        Ok((record.s3.bucket.name.as_str(), record.s3.object.key.as_str()))
    }
}
