use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::actor_framework::ResourceActor;
use crate::auth::{hash_password, TokenKeys};
use crate::clients::{BookingClient, DispatchClient, FleetClient, UserClient};
use crate::config::{AdminSeed, Config};
use crate::dispatch::DispatchService;
use crate::domain::{Booking, Driver, Role, Truck, User, UserCreate};
use crate::error::{LogisticsError, LogisticsResult};
use crate::http::AppState;
use crate::notify::{LogNotifier, Notifier};
use crate::pricing::{
    DistanceProvider, EstimatedDistanceProvider, PricingCalculator, PricingRates, RemoteDistanceProvider,
};

/// `<prefix>_1`, `<prefix>_2`, ...
fn sequential_ids(prefix: &'static str) -> impl Fn() -> String + Send + Sync + 'static {
    let counter = Arc::new(AtomicU64::new(1));
    move || format!("{}_{}", prefix, counter.fetch_add(1, Ordering::SeqCst))
}

/// The running application: every actor, started and wired together.
///
/// Responsible for starting up actors, wiring them together, and handling shutdown.
pub struct LogisticsSystem {
    pub bookings: BookingClient,
    pub fleet: FleetClient,
    pub users: UserClient,
    pub dispatch: DispatchClient,
    handles: Vec<JoinHandle<()>>,
}

impl LogisticsSystem {
    pub fn new(buffer_size: usize, pricing: Arc<PricingCalculator>, notifier: Arc<dyn Notifier>) -> Self {
        // 1. Store actors
        let (user_actor, user_resource_client) = ResourceActor::<User>::new(buffer_size, sequential_ids("user"));
        let users = UserClient::new(user_resource_client);
        let user_handle = tokio::spawn(user_actor.run());

        let (truck_actor, truck_resource_client) = ResourceActor::<Truck>::new(buffer_size, sequential_ids("truck"));
        let truck_handle = tokio::spawn(truck_actor.run());

        let (driver_actor, driver_resource_client) =
            ResourceActor::<Driver>::new(buffer_size, sequential_ids("driver"));
        let driver_handle = tokio::spawn(driver_actor.run());

        let fleet = FleetClient::new(truck_resource_client, driver_resource_client);

        let (booking_actor, booking_resource_client) =
            ResourceActor::<Booking>::new(buffer_size, sequential_ids("booking"));
        let bookings = BookingClient::new(booking_resource_client, pricing, notifier);
        let booking_handle = tokio::spawn(booking_actor.run());

        // 2. Root orchestrator over the stores
        let (dispatch_service, dispatch) = DispatchService::new(buffer_size, bookings.clone(), fleet.clone());
        let dispatch_handle = tokio::spawn(dispatch_service.run());

        Self {
            bookings,
            fleet,
            users,
            dispatch,
            handles: vec![user_handle, truck_handle, driver_handle, booking_handle, dispatch_handle],
        }
    }

    /// Offline pricing and logged notifications.
    pub fn in_memory() -> Self {
        Self::new(
            32,
            Arc::new(PricingCalculator::estimated(PricingRates::default())),
            Arc::new(LogNotifier),
        )
    }

    pub fn from_config(config: &Config) -> Self {
        let provider: Arc<dyn DistanceProvider> = match &config.distance_api_url {
            Some(url) => {
                info!(url = %url, "Using remote distance service");
                Arc::new(RemoteDistanceProvider::new(url.clone(), config.distance_api_key.clone()))
            }
            None => {
                warn!("DISTANCE_API_URL not set, estimating distances offline");
                Arc::new(EstimatedDistanceProvider)
            }
        };
        let pricing = PricingCalculator::new(config.rates, provider, config.distance_timeout);
        Self::new(config.actor_buffer, Arc::new(pricing), Arc::new(LogNotifier))
    }

    /// Creates the administrator account unless one with that email exists.
    pub async fn seed_admin(&self, seed: &AdminSeed) -> LogisticsResult<User> {
        if let Some(existing) = self.users.find_by_email(&seed.email).await? {
            if existing.role != Role::Admin {
                return Err(LogisticsError::Conflict(format!(
                    "{} is registered as a regular user",
                    existing.email
                )));
            }
            return Ok(existing);
        }

        let admin = self
            .users
            .register(UserCreate {
                name: seed.name.clone(),
                email: seed.email.clone(),
                phone: None,
                role: Role::Admin,
                password_hash: hash_password(&seed.password)?,
            })
            .await?;
        info!(user_id = %admin.id, "Administrator account seeded");
        Ok(admin)
    }

    pub fn app_state(&self, tokens: TokenKeys, health_timeout: Duration) -> AppState {
        AppState {
            bookings: self.bookings.clone(),
            fleet: self.fleet.clone(),
            users: self.users.clone(),
            dispatch: self.dispatch.clone(),
            tokens: Arc::new(tokens),
            health_timeout,
        }
    }

    /// Stops the dispatch actor, then lets the stores drain once every client
    /// is gone. Clients cloned into a router must be dropped first.
    pub async fn shutdown(self) -> LogisticsResult<()> {
        info!("Shutting down system...");

        if let Err(e) = self.dispatch.shutdown().await {
            warn!(error = %e, "Dispatch actor already stopped");
        }

        drop(self.dispatch);
        drop(self.bookings);
        drop(self.fleet);
        drop(self.users);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(LogisticsError::ActorCommunication(format!("Actor task failed: {e}")));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
