//! Shared device audio session
//!
//! The device audio session is a process-wide resource: one OS-level
//! configuration (category, mode, routing) shared by every audio track and
//! potentially other subsystems. It is modeled as an explicit owned value
//! injected into each track (`Arc<AudioSession>`) rather than ambient
//! global state, and configured only under a scoped, mutually exclusive
//! guard so no two configuration attempts can interleave.

use parking_lot::{Mutex as ParkingMutex, MutexGuard};

pub mod profile;

pub use profile::{
    AudioCategory, AudioMode, AudioProcessingConstraints, AudioSessionProfile, CategoryOptions,
};

use crate::track::MediaResult;

/// OS-level routing collaborator
///
/// The default route only does bookkeeping; embedders integrate actual
/// audio routing by supplying their own implementation.
pub trait SessionRoute: Send + Sync {
    /// Apply the profile to the device session with the requested active
    /// flag. Called only while the configuration lock is held.
    fn apply(&self, profile: &AudioSessionProfile, active: bool) -> MediaResult<()>;
}

/// Bookkeeping-only route that always succeeds
#[derive(Debug, Default)]
pub struct SystemRoute;

impl SessionRoute for SystemRoute {
    fn apply(&self, _profile: &AudioSessionProfile, _active: bool) -> MediaResult<()> {
        Ok(())
    }
}

#[derive(Debug, Default)]
struct SessionState {
    active: bool,
    profile: Option<AudioSessionProfile>,
}

/// The shared device audio session
pub struct AudioSession {
    state: ParkingMutex<SessionState>,
    route: Box<dyn SessionRoute>,
}

impl AudioSession {
    pub fn new() -> Self {
        Self::with_route(Box::new(SystemRoute))
    }

    pub fn with_route(route: Box<dyn SessionRoute>) -> Self {
        Self {
            state: ParkingMutex::new(SessionState::default()),
            route,
        }
    }

    /// Acquire the exclusive configuration lock
    ///
    /// The lock is released when the returned guard drops, on every exit
    /// path. Holders must not block on anything but the configuration
    /// itself.
    pub fn lock_for_configuration(&self) -> SessionConfigurationGuard<'_> {
        SessionConfigurationGuard {
            state: self.state.lock(),
            route: self.route.as_ref(),
        }
    }

    /// Acquire the configuration lock only if it is currently free
    pub fn try_lock_for_configuration(&self) -> Option<SessionConfigurationGuard<'_>> {
        self.state.try_lock().map(|state| SessionConfigurationGuard {
            state,
            route: self.route.as_ref(),
        })
    }

    /// Whether the session was last configured active
    pub fn is_active(&self) -> bool {
        self.state.lock().active
    }

    /// The most recently applied profile, if any
    pub fn current_profile(&self) -> Option<AudioSessionProfile> {
        self.state.lock().profile.clone()
    }
}

impl Default for AudioSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Scoped holder of the session configuration lock
pub struct SessionConfigurationGuard<'a> {
    state: MutexGuard<'a, SessionState>,
    route: &'a dyn SessionRoute,
}

impl SessionConfigurationGuard<'_> {
    /// Apply a profile with the requested active flag
    ///
    /// Routes through the [`SessionRoute`] first; session state is only
    /// updated when the route accepts the configuration. On failure the
    /// previous state stands and the error is returned for the caller to
    /// log and discard.
    pub fn set_configuration(
        &mut self,
        profile: &AudioSessionProfile,
        active: bool,
    ) -> MediaResult<()> {
        self.route.apply(profile, active)?;
        self.state.active = active;
        self.state.profile = Some(profile.clone());
        Ok(())
    }
}
