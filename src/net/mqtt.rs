//! MQTT adapter for the target.
//!
//! Wraps `EspMqttClient` behind the [`PublishPort`] and runs the
//! blocking receive loop that feeds the command dispatcher.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use anyhow::Result;
use esp_idf_svc::mqtt::client::{
    Details, EspMqttClient, EspMqttConnection, EventPayload, MqttClientConfiguration, QoS,
};
use log::{info, warn};

use crate::config::NetworkConfig;
use crate::error::{CommsError, Error};
use crate::net::{ingress, topics};
use crate::ports::PublishPort;
use crate::room::Room;
use crate::thermostat::Thermostat;

type SharedClient = Arc<Mutex<EspMqttClient<'static>>>;

/// Publish-side handle. Cloneable; the egress task holds one.
#[derive(Clone)]
pub struct MqttPublisher {
    client: SharedClient,
}

impl PublishPort for MqttPublisher {
    fn publish(&mut self, topic: &str, payload: &[u8]) -> crate::error::Result<()> {
        self.client
            .lock()
            .expect("mqtt client mutex poisoned")
            .publish(topic, QoS::AtMostOnce, false, payload)
            .map(|_| ())
            .map_err(|_| Error::from(CommsError::MqttPublishFailed))
    }
}

/// Create the client/connection pair and subscribe to the command topics.
pub fn connect(cfg: &NetworkConfig) -> Result<(MqttPublisher, EspMqttConnection)> {
    let conf = MqttClientConfiguration {
        client_id: Some(cfg.client_id.as_str()),
        ..Default::default()
    };
    let (client, connection) = EspMqttClient::new(cfg.broker_url.as_str(), &conf)?;
    let client = Arc::new(Mutex::new(client));
    subscribe_all(&client)?;
    info!("mqtt: client created for {}", cfg.broker_url);
    Ok((MqttPublisher { client }, connection))
}

fn subscribe_all(client: &SharedClient) -> crate::error::Result<()> {
    let mut client = client.lock().expect("mqtt client mutex poisoned");
    for topic in topics::SUBSCRIPTIONS {
        client
            .subscribe(topic, QoS::AtMostOnce)
            .map_err(|_| Error::from(CommsError::MqttSubscribeFailed))?;
    }
    Ok(())
}

/// Spawn the blocking receive loop. Owns the connection; every complete
/// message goes through the dispatcher. Connection errors flip the
/// advisory link flag and trigger a re-subscribe once the session heals.
pub fn spawn_receiver(
    thermostat: Thermostat,
    room: Room,
    publisher: MqttPublisher,
    mut connection: EspMqttConnection,
    online: Arc<AtomicBool>,
) -> Result<()> {
    thread::Builder::new()
        .name("mqtt-rx".into())
        .stack_size(12 * 1024)
        .spawn(move || loop {
            match connection.next() {
                Ok(event) => {
                    online.store(true, Ordering::Relaxed);
                    if let EventPayload::Received {
                        topic: Some(topic),
                        data,
                        details,
                        ..
                    } = event.payload()
                    {
                        // Only complete payloads; fragments are dropped.
                        if !matches!(details, Details::Complete) {
                            continue;
                        }
                        ingress::dispatch(&thermostat, &room, topic, data);
                    }
                }
                Err(err) => {
                    online.store(false, Ordering::Relaxed);
                    warn!("mqtt: receive loop error: {err:?}");
                    thread::sleep(Duration::from_secs(2));
                    if let Err(err) = subscribe_all(&publisher.client) {
                        warn!("mqtt: re-subscribe failed: {err:#}");
                    }
                }
            }
        })?;
    Ok(())
}
