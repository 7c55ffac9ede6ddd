//! WiFi station bring-up for the target.

use std::thread;
use std::time::Duration;

use anyhow::{anyhow, Result};
use esp_idf_svc::eventloop::EspSystemEventLoop;
use esp_idf_svc::hal::modem::Modem;
use esp_idf_svc::nvs::EspDefaultNvsPartition;
use esp_idf_svc::wifi::{AuthMethod, BlockingWifi, ClientConfiguration, Configuration, EspWifi};
use log::{info, warn};

use crate::config::NetworkConfig;

const CONNECT_ATTEMPTS: u32 = 5;

/// Associate with the configured network and wait for the interface to
/// come up. The returned handle must stay alive for the link to persist.
pub fn connect_station(
    modem: Modem,
    sys_loop: EspSystemEventLoop,
    nvs: EspDefaultNvsPartition,
    cfg: &NetworkConfig,
) -> Result<EspWifi<'static>> {
    let mut esp_wifi = EspWifi::new(modem, sys_loop.clone(), Some(nvs))?;
    let mut wifi = BlockingWifi::wrap(&mut esp_wifi, sys_loop)?;

    let auth_method = if cfg.wifi_pass.is_empty() {
        AuthMethod::None
    } else {
        AuthMethod::WPAWPA2Personal
    };

    wifi.set_configuration(&Configuration::Client(ClientConfiguration {
        ssid: cfg
            .wifi_ssid
            .as_str()
            .try_into()
            .map_err(|_| anyhow!("wifi ssid too long"))?,
        password: cfg
            .wifi_pass
            .as_str()
            .try_into()
            .map_err(|_| anyhow!("wifi password too long"))?,
        auth_method,
        ..Default::default()
    }))?;

    wifi.start()?;
    info!("wifi: started, connecting to `{}`", cfg.wifi_ssid);

    let retry = Duration::from_millis(cfg.wifi_retry_interval_ms.into());
    let mut last_err = None;
    for attempt in 1..=CONNECT_ATTEMPTS {
        match wifi.connect() {
            Ok(()) => match wifi.wait_netif_up() {
                Ok(()) => {
                    info!("wifi: connected, netif up on attempt {attempt}");
                    last_err = None;
                    break;
                }
                Err(err) => {
                    warn!("wifi: netif up failed on attempt {attempt}: {err:#}");
                    last_err = Some(err);
                }
            },
            Err(err) => {
                warn!("wifi: connect failed on attempt {attempt}: {err:#}");
                last_err = Some(err);
            }
        }
        if attempt < CONNECT_ATTEMPTS {
            let _ = wifi.disconnect();
            thread::sleep(retry);
        }
    }

    match last_err {
        None => Ok(esp_wifi),
        Some(err) => Err(anyhow!(
            "all {CONNECT_ATTEMPTS} wifi connect attempts failed: {err}"
        )),
    }
}
