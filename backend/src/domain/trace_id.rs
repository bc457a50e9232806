//! Request correlation id.
//!
//! A [`TraceId`] is chosen once per request: the caller's `trace-id` header
//! when it holds a usable UUID, a fresh v4 UUID otherwise. It then sits in
//! task-local storage so services and error constructors can stamp it
//! without threading it through every signature. Task locals do not follow
//! `tokio::spawn`; wrap spawned work in [`TraceId::scope`].

use std::fmt;
use std::future::Future;
use std::str::FromStr;

use tokio::task_local;
use uuid::Uuid;

task_local! {
    static TRACE_ID: TraceId;
}

/// Per-request correlation id.
///
/// # Examples
/// ```
/// use todo_backend::TraceId;
///
/// async fn handler() -> Option<String> {
///     TraceId::current().map(|id| id.to_string())
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceId(Uuid);

impl TraceId {
    pub(crate) fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Continue the caller's trace when `header` holds a non-nil UUID,
    /// otherwise start a new one.
    ///
    /// ```
    /// use todo_backend::TraceId;
    ///
    /// let upstream = "5f0c7d9e-3b1a-4c8e-9f2d-6a7b8c9d0e1f";
    /// assert_eq!(TraceId::continue_or_start(Some(upstream)).to_string(), upstream);
    /// assert_ne!(TraceId::continue_or_start(Some("not-a-uuid")).to_string(), "not-a-uuid");
    /// ```
    #[must_use]
    pub fn continue_or_start(header: Option<&str>) -> Self {
        header
            .and_then(|value| value.trim().parse::<Self>().ok())
            .filter(|id| !id.0.is_nil())
            .unwrap_or_else(Self::generate)
    }

    /// The id of the request being handled, if any.
    #[must_use]
    pub fn current() -> Option<Self> {
        TRACE_ID.try_with(|id| *id).ok()
    }

    /// Run `fut` with `trace_id` as the current id.
    pub async fn scope<Fut>(trace_id: Self, fut: Fut) -> Fut::Output
    where
        Fut: Future,
    {
        TRACE_ID.scope(trace_id, fut).await
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0.hyphenated(), f)
    }
}

impl FromStr for TraceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}
