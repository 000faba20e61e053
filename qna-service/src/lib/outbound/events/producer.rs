use std::time::Duration;

use async_trait::async_trait;
use rdkafka::config::ClientConfig;
use rdkafka::producer::FutureProducer;
use rdkafka::producer::FutureRecord;
use rdkafka::util::Timeout;

use crate::config::AuditConfig;
use crate::domain::user::errors::AuditError;
use crate::domain::user::events::AuditEvent;
use crate::domain::user::ports::AuditLogger;
use crate::outbound::events::messages::AuditLogMessage;

/// Audit log sink backed by a Kafka topic.
pub struct KafkaAuditLogger {
    producer: FutureProducer,
    topic: String,
    timeout: Duration,
}

impl KafkaAuditLogger {
    /// Create a producer with "at least once" delivery semantics
    ///
    /// # Notes:
    /// - `acks=all`: Wait for all in-sync replicas to acknowledge
    /// - `enable.idempotence=true`: Prevents duplicate records during retries
    pub fn new(config: &AuditConfig) -> Result<Self, anyhow::Error> {
        tracing::info!(
            brokers = %config.brokers,
            topic = %config.topic,
            "Initializing Kafka audit logger"
        );

        let producer: FutureProducer = ClientConfig::new()
            .set("bootstrap.servers", &config.brokers)
            .set("message.timeout.ms", "10000")
            .set("enable.idempotence", "true")
            .set("acks", "all")
            .set("retries", "5")
            .set("retry.backoff.ms", "100")
            .create()?;

        Ok(Self {
            producer,
            topic: config.topic.clone(),
            timeout: Duration::from_secs(10),
        })
    }
}

#[async_trait]
impl AuditLogger for KafkaAuditLogger {
    async fn log(&self, event: &AuditEvent) -> Result<(), AuditError> {
        let message = AuditLogMessage::from(event);
        let payload = serde_json::to_string(&message)
            .map_err(|e| AuditError::SerializationFailed(e.to_string()))?;
        let key = event.entity_id.to_string();

        // Keyed by entity so records for one user stay ordered.
        let record = FutureRecord::to(&self.topic).key(&key).payload(&payload);

        self.producer
            .send(record, Timeout::After(self.timeout))
            .await
            .map(|_| {
                tracing::debug!(
                    topic = %self.topic,
                    action = %message.action,
                    entity_id = event.entity_id,
                    "Audit record published"
                );
            })
            .map_err(|(err, _)| {
                tracing::error!(
                    topic = %self.topic,
                    action = %message.action,
                    entity_id = event.entity_id,
                    error = %err,
                    "Failed to publish audit record"
                );
                AuditError::PublishFailed(err.to_string())
            })
    }
}
