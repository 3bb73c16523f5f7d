use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::info;

use crate::entities::work_order::WorkOrderStatus;

/// Domain events emitted after a transaction commits. The stream is
/// observational; no money- or stock-affecting work happens here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    WorkOrderCreated {
        work_order_id: i32,
        order_number: String,
    },
    WorkOrderStatusChanged {
        work_order_id: i32,
        old_status: WorkOrderStatus,
        new_status: WorkOrderStatus,
    },
    WorkOrderCancelled {
        work_order_id: i32,
    },
    WorkOrderDeleted {
        work_order_id: i32,
    },
    ItemAddedToWorkOrder {
        work_order_id: i32,
        inventory_item_id: i32,
        quantity: i32,
    },
    ItemRemovedFromWorkOrder {
        work_order_id: i32,
        inventory_item_id: i32,
        quantity: i32,
    },
}

#[derive(Debug, Clone)]
pub struct EventSender {
    sender: mpsc::Sender<Event>,
}

impl EventSender {
    pub fn new(sender: mpsc::Sender<Event>) -> Self {
        Self { sender }
    }

    /// Sends an event asynchronously.
    pub async fn send(&self, event: Event) -> Result<(), String> {
        self.sender
            .send(event)
            .await
            .map_err(|e| format!("Failed to send event: {}", e))
    }
}

/// Drains the event channel, logging each event. Runs for the lifetime of
/// the process.
pub async fn process_events(mut rx: mpsc::Receiver<Event>) {
    while let Some(event) = rx.recv().await {
        info!(?event, "Processing event");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn send_delivers_event() {
        let (tx, mut rx) = mpsc::channel(4);
        let sender = EventSender::new(tx);

        sender
            .send(Event::WorkOrderCreated {
                work_order_id: 1,
                order_number: "OS20240601-0001".to_string(),
            })
            .await
            .unwrap();

        match rx.recv().await {
            Some(Event::WorkOrderCreated { work_order_id, .. }) => assert_eq!(work_order_id, 1),
            other => panic!("unexpected event: {:?}", other),
        }
    }
}
