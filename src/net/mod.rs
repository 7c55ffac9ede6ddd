//! Network plumbing: topic vocabulary, the command dispatcher and the
//! telemetry egress task. The MQTT client and WiFi bring-up adapters
//! only exist on the target.

pub mod egress;
pub mod ingress;
pub mod topics;

#[cfg(target_os = "espidf")]
pub mod mqtt;
#[cfg(target_os = "espidf")]
pub mod wifi;
