/// Availability changes for a truck.
///
/// These are the only way `availability_status` moves. `Release` is the single
/// path from ASSIGNED back to AVAILABLE.
#[derive(Debug, Clone)]
pub enum TruckAction {
    /// AVAILABLE -> ASSIGNED for a load of the given weight in tons.
    Reserve { load: f64 },
    /// ASSIGNED -> AVAILABLE.
    Release,
    /// AVAILABLE -> MAINTENANCE.
    BeginMaintenance,
    /// MAINTENANCE -> AVAILABLE.
    EndMaintenance,
}
