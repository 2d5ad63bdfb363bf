use std::{convert::Infallible, time::Duration as StdDuration};

use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
};
use tokio::sync::broadcast::error::RecvError;

use crate::AppState;

// GET /events  (SSE)
pub async fn sse_events(
    State(state): State<AppState>,
) -> Sse<impl futures_util::stream::Stream<Item = Result<Event, Infallible>>> {
    let rx = state.events_tx.subscribe();

    let stream = futures_util::stream::unfold(rx, |mut rx| async {
        let evt = match rx.recv().await {
            Ok(name) => Event::default().event(name).data("1"),
            Err(RecvError::Lagged(_)) => Event::default().event("ping").data("lagged"),
            Err(RecvError::Closed) => return None,
        };

        Some((Ok(evt), rx))
    });

    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(StdDuration::from_secs(20))
            .text("keep-alive"),
    )
}
