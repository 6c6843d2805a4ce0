//! # Mock Framework
//!
//! Utilities for testing clients in isolation.
//!
//! Use [`create_mock_client`] to get a client and a receiver.
//! Then use helpers like [`expect_create`] or [`expect_action`] to script the
//! store's side of a workflow step by step. The `seeded_*` helpers populate a
//! real in-memory system instead.

use tokio::sync::{mpsc, oneshot};

use crate::actor_framework::{Entity, ResourceClient, ResourceRequest};
use crate::app_system::LogisticsSystem;
use crate::domain::{Booking, BookingDraft, Driver, Requester, Truck};
use crate::driver_actor::DriverCreate;
use crate::error::LogisticsError;
use crate::truck_actor::TruckCreate;

type Reply<T> = oneshot::Sender<Result<T, LogisticsError>>;

/// Creates a mock client and a receiver for asserting requests.
///
/// The client sends to a channel the test owns, so the test plays the actor:
/// it inspects each request and answers with success, failure or nothing.
pub fn create_mock_client<T: Entity>(buffer_size: usize) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Helper to verify that the next message is a Create request
pub async fn expect_create<T: Entity>(receiver: &mut mpsc::Receiver<ResourceRequest<T>>) -> Option<(T::CreateParams, Reply<T>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Get request
pub async fn expect_get<T: Entity>(receiver: &mut mpsc::Receiver<ResourceRequest<T>>) -> Option<(T::Id, Reply<Option<T>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a List request
pub async fn expect_list<T: Entity>(receiver: &mut mpsc::Receiver<ResourceRequest<T>>) -> Option<Reply<Vec<T>>> {
    match receiver.recv().await {
        Some(ResourceRequest::List { respond_to }) => Some(respond_to),
        _ => None,
    }
}

/// Helper to verify that the next message is an Action request
pub async fn expect_action<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, T::Action, Reply<T::ActionResult>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action { id, action, respond_to }) => Some((id, action, respond_to)),
        _ => None,
    }
}

// --- Fixtures against a real system ---

pub fn requester() -> Requester {
    Requester {
        user_id: "user_42".into(),
        user_name: "Asha".into(),
        email: "asha@example.com".into(),
    }
}

pub async fn seeded_booking(system: &LogisticsSystem, weight: f64) -> Booking {
    system
        .bookings
        .create_booking(requester(), BookingDraft::new("A", "B", "Grain", weight))
        .await
        .expect("booking fixture")
}

pub async fn seeded_truck(system: &LogisticsSystem, number: &str, capacity: f64) -> Truck {
    system
        .fleet
        .create_truck(TruckCreate {
            truck_number: number.into(),
            truck_type: "Flatbed".into(),
            capacity: Some(capacity),
        })
        .await
        .expect("truck fixture")
}

pub async fn seeded_driver(system: &LogisticsSystem, license: &str) -> Driver {
    system
        .dispatch
        .create_driver(DriverCreate {
            name: "Ravi".into(),
            phone: "98450 00000".into(),
            license_number: license.into(),
            assigned_truck_id: None,
        })
        .await
        .expect("driver fixture")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Role, User, UserCreate};

    #[tokio::test]
    async fn test_mock_client() {
        let (client, mut receiver) = create_mock_client::<User>(10);

        let create_task = tokio::spawn(async move {
            client
                .create(UserCreate {
                    name: "Test".into(),
                    email: "test@example.com".into(),
                    phone: None,
                    role: Role::User,
                    password_hash: "hash".into(),
                })
                .await
        });

        let (payload, responder) = expect_create(&mut receiver).await.expect("Expected Create request");
        assert_eq!(payload.name, "Test");
        let user = User::from_create_params("user_1".into(), payload).unwrap();
        responder.send(Ok(user.clone())).unwrap();

        let result = create_task.await.unwrap();
        assert_eq!(result, Ok(user));
    }
}
