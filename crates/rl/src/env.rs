use crate::error::EnvError;

/// A resettable, steppable environment driven by flat float vectors.
pub trait Env {
    /// Length of every observation vector.
    fn obs_size(&self) -> usize;
    /// Length every action vector must have.
    fn action_size(&self) -> usize;

    /// Start a new episode and return its first observation.
    ///
    /// # Errors
    ///
    /// Fails if the episode cannot be set up.
    fn reset(&mut self) -> Result<Vec<f32>, EnvError>;

    /// Apply one action and advance a tick.
    /// Returns the next observation, the reward earned and whether the
    /// episode has ended.
    ///
    /// # Errors
    ///
    /// Fails on a malformed action or a faulted tick.
    fn step(&mut self, action: &[f32]) -> Result<(Vec<f32>, f32, bool), EnvError>;
}
