//! Effects - side effects declared by the reducer

/// Side effects that can be triggered by actions
#[derive(Debug, Clone)]
pub enum Effect {
    /// Fetch current weather for the submitted city. `seq` tags the request
    /// so stale completions can be discarded.
    FetchWeather { city: String, seq: u64 },
}
