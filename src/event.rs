use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent};
use futures::StreamExt;
use tokio::sync::mpsc;

use crate::metrics::TickReport;

const HOUSEKEEPING_INTERVAL: Duration = Duration::from_millis(1000);

#[derive(Clone, Debug)]
pub enum Event {
    Key(KeyEvent),
    Sampled(TickReport),
    Housekeeping,
    Resize,
}

/// Merges terminal input and sampler notifications into one stream.
pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<Event>,
    _task: tokio::task::JoinHandle<()>,
}

impl EventHandler {
    pub fn new(mut samples: mpsc::UnboundedReceiver<TickReport>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel::<Event>();

        let task = tokio::spawn(async move {
            let mut reader = event::EventStream::new();
            let mut housekeeping = tokio::time::interval(HOUSEKEEPING_INTERVAL);

            loop {
                tokio::select! {
                    maybe_event = reader.next() => {
                        match maybe_event {
                            Some(Ok(evt)) => {
                                let mapped = match evt {
                                    CrosstermEvent::Key(key) => Some(Event::Key(key)),
                                    CrosstermEvent::Resize(_, _) => Some(Event::Resize),
                                    _ => None,
                                };
                                if let Some(e) = mapped
                                    && tx.send(e).is_err()
                                {
                                    break;
                                }
                            }
                            Some(Err(err)) => {
                                tracing::error!(error = %err, "terminal event stream failed");
                                break;
                            }
                            None => break,
                        }
                    }
                    Some(report) = samples.recv() => {
                        if tx.send(Event::Sampled(report)).is_err() {
                            break;
                        }
                    }
                    _ = housekeeping.tick() => {
                        if tx.send(Event::Housekeeping).is_err() {
                            break;
                        }
                    }
                }
            }
        });

        Self { rx, _task: task }
    }

    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }
}
