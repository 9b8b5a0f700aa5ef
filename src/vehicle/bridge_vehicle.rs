use super::{
    Actuators, AttitudeControl, ControlError, HoldMode, Hud, LaunchTrigger, TelemetrySnapshot,
    TelemetrySource,
};
use crate::http_handler::{
    HTTPError,
    http_client::HTTPClient,
    http_request::{
        autopilot_put::AutopilotRequest,
        control_put::ControlRequest,
        message_post::MessageRequest,
        request_common::{JSONBodyHTTPRequestType, NoBodyHTTPRequestType},
        stage_post::StageRequest,
        status_put::StatusRequest,
        telemetry_get::TelemetryRequest,
        trigger_get::TriggerRequest,
        trigger_put::TriggerResetRequest,
    },
    http_response::command_ack::CommandAckResponse,
};
use crate::{error, warn};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// The vehicle as seen through the REST bridge.
pub struct BridgeVehicle {
    client: Arc<HTTPClient>,
}

impl BridgeVehicle {
    pub fn new(base_url: &str) -> Self { Self { client: Arc::new(HTTPClient::new(base_url)) } }

    /// Maps the outcome of a command call onto the core's error type.
    fn acknowledge(
        command: &'static str,
        result: Result<CommandAckResponse, HTTPError>,
    ) -> Result<(), ControlError> {
        match result {
            Ok(ack) if ack.accepted() => Ok(()),
            Ok(_) => {
                error!("Bridge refused command {command}");
                Err(ControlError::ActuatorRejected { command })
            }
            Err(e) => {
                error!("Command {command} failed: {e}");
                Err(ControlError::ActuatorRejected { command })
            }
        }
    }

    async fn control(&self, command: &'static str, req: ControlRequest) -> Result<(), ControlError> {
        Self::acknowledge(command, req.send_request(&self.client).await)
    }

    async fn autopilot(&self, req: AutopilotRequest) -> Result<(), ControlError> {
        Self::acknowledge("autopilot", req.send_request(&self.client).await)
    }
}

#[async_trait]
impl TelemetrySource for BridgeVehicle {
    async fn observe(&self) -> Result<TelemetrySnapshot, ControlError> {
        match (TelemetryRequest {}.send_request(&self.client).await) {
            Ok(telemetry) => Ok(TelemetrySnapshot::from(telemetry)),
            Err(e) => {
                warn!("Telemetry request failed: {e}");
                Err(ControlError::TelemetryUnavailable)
            }
        }
    }
}

#[async_trait]
impl AttitudeControl for BridgeVehicle {
    async fn engage(&self) -> Result<(), ControlError> {
        self.autopilot(AutopilotRequest { engaged: Some(true), ..Default::default() }).await
    }

    async fn disengage(&self) -> Result<(), ControlError> {
        self.autopilot(AutopilotRequest { engaged: Some(false), ..Default::default() }).await
    }

    async fn point_at(&self, pitch: f64, heading: f64) -> Result<(), ControlError> {
        let req = AutopilotRequest { pitch: Some(pitch), heading: Some(heading), ..Default::default() };
        self.autopilot(req).await
    }

    async fn set_target_roll(&self, roll: f64) -> Result<(), ControlError> {
        self.autopilot(AutopilotRequest { roll: Some(roll), ..Default::default() }).await
    }

    async fn hold_mode(&self, mode: HoldMode) -> Result<(), ControlError> {
        let req = AutopilotRequest { sas: Some(true), hold: Some(mode), ..Default::default() };
        self.autopilot(req).await
    }

    async fn release_hold(&self) -> Result<(), ControlError> {
        self.autopilot(AutopilotRequest { sas: Some(false), ..Default::default() }).await
    }
}

#[async_trait]
impl Actuators for BridgeVehicle {
    async fn set_throttle(&self, throttle: f64) -> Result<(), ControlError> {
        self.control("throttle", ControlRequest { throttle: Some(throttle), ..Default::default() })
            .await
    }

    async fn set_gear(&self, deployed: bool) -> Result<(), ControlError> {
        self.control("gear", ControlRequest { gear: Some(deployed), ..Default::default() }).await
    }

    async fn set_airbrakes(&self, enabled: bool) -> Result<(), ControlError> {
        self.control("airbrakes", ControlRequest { airbrakes: Some(enabled), ..Default::default() })
            .await
    }

    async fn set_rcs(&self, enabled: bool) -> Result<(), ControlError> {
        self.control("rcs", ControlRequest { rcs: Some(enabled), ..Default::default() }).await
    }

    async fn set_gimbal_lock(&self, locked: bool) -> Result<(), ControlError> {
        let req = ControlRequest { gimbal_locked: Some(locked), ..Default::default() };
        self.control("gimbal_lock", req).await
    }

    async fn set_thrust_limit(&self, limit: f64) -> Result<(), ControlError> {
        let req = ControlRequest { thrust_limit: Some(limit), ..Default::default() };
        self.control("thrust_limit", req).await
    }

    async fn set_gimbal_limit(&self, limit: f64) -> Result<(), ControlError> {
        let req = ControlRequest { gimbal_limit: Some(limit), ..Default::default() };
        self.control("gimbal_limit", req).await
    }

    async fn activate_next_stage(&self) -> Result<(), ControlError> {
        Self::acknowledge("stage", StageRequest {}.send_request(&self.client).await)
    }
}

#[async_trait]
impl Hud for BridgeVehicle {
    async fn notify(&self, message: &str, duration: Duration) {
        let req = MessageRequest { text: message.to_string(), duration: duration.as_secs_f64() };
        if let Err(e) = req.send_request(&self.client).await {
            warn!("Display message not shown: {e}");
        }
    }

    async fn status(&self, text: &str) {
        let req = StatusRequest { text: text.to_string() };
        if let Err(e) = req.send_request(&self.client).await {
            warn!("Status line not updated: {e}");
        }
    }
}

#[async_trait]
impl LaunchTrigger for BridgeVehicle {
    async fn triggered(&self) -> Result<bool, ControlError> {
        TriggerRequest {}.send_request(&self.client).await.map(|t| t.clicked()).map_err(|e| {
            warn!("Trigger read failed: {e}");
            ControlError::TriggerUnavailable
        })
    }

    async fn reset(&self) -> Result<(), ControlError> {
        Self::acknowledge("trigger", TriggerResetRequest { clicked: false }.send_request(&self.client).await)
    }
}
