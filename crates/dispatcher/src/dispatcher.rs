use roster_domain::{
    decode_payload, parse_command, parse_query_route, AdvanceRequest, CodecError, FinishStatus,
    InspectRequest, OutboundEvent, Roster, RollupRequest,
};
use tracing::{debug, info, warn};

use crate::handlers::{apply_command, run_query};

/// Result of handling one rollup request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchOutcome {
    /// Status for the next `/finish` call
    pub status: FinishStatus,
    /// Events to send, in order, before finishing
    pub events: Vec<OutboundEvent>,
    /// Text handed back to an inspect caller; same as its report
    pub response: Option<String>,
}

impl DispatchOutcome {
    fn accept(events: Vec<OutboundEvent>) -> Self {
        Self {
            status: FinishStatus::Accept,
            events,
            response: None,
        }
    }

    fn reject(events: Vec<OutboundEvent>) -> Self {
        Self {
            status: FinishStatus::Reject,
            events,
            response: None,
        }
    }
}

pub fn dispatch(roster: &mut Roster, request: &RollupRequest) -> DispatchOutcome {
    match request {
        RollupRequest::Advance(advance) => handle_advance(roster, advance),
        RollupRequest::Inspect(inspect) => handle_inspect(roster, inspect),
        RollupRequest::Unsupported { request_type } => {
            warn!("Unknown request type: {}", request_type);
            DispatchOutcome::reject(Vec::new())
        }
    }
}

/// Handles an `advance_state` request.
///
/// Once the payload decodes the status is always `accept`, also when the
/// addressed student does not exist or the method is unknown. Business
/// outcomes travel in the events, not in the finish status. Only an
/// undecodable payload is rejected.
pub fn handle_advance(roster: &mut Roster, request: &AdvanceRequest) -> DispatchOutcome {
    info!(
        sender = %request.metadata.msg_sender,
        input_index = ?request.metadata.input_index,
        "Received advance request"
    );

    let command = match decode_payload(&request.payload).and_then(|text| {
        debug!("Decoded advance payload: {}", text);
        parse_command(&text)
    }) {
        Ok(command) => command,
        Err(e) => {
            warn!("Rejecting advance request: {}", e);
            return DispatchOutcome::reject(vec![invalid_payload(&e)]);
        }
    };

    let sender = request.metadata.msg_sender.as_str();
    let events = apply_command(roster, command, sender).into_iter().collect();
    DispatchOutcome::accept(events)
}

/// Handles an `inspect_state` request. The roster is only read.
///
/// The returned `response` and the single report carry the same text. An
/// undecodable route is reported and rejected like an undecodable advance.
pub fn handle_inspect(roster: &Roster, request: &InspectRequest) -> DispatchOutcome {
    info!("Received inspect request");

    let (status, text) = match decode_payload(&request.payload) {
        Ok(route) => {
            debug!("Decoded inspect route: {}", route);
            (
                FinishStatus::Accept,
                run_query(roster, &parse_query_route(&route)),
            )
        }
        Err(e) => {
            warn!("Rejecting inspect request: {}", e);
            (FinishStatus::Reject, invalid_payload(&e).text().to_string())
        }
    };

    DispatchOutcome {
        status,
        events: vec![OutboundEvent::report(text.clone())],
        response: Some(text),
    }
}

fn invalid_payload(error: &CodecError) -> OutboundEvent {
    OutboundEvent::report(format!("Invalid payload: {error}"))
}
