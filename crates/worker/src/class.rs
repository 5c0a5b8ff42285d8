/// Classification for spawned work, used for instrumentation and scheduling
/// decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskClass {
	/// Interactive work a user is actively waiting on (lightbulb-style
	/// diagnostic requests).
	Interactive,
	/// Background work that may be preempted or deferred in favor of
	/// interactive work.
	Background,
}

impl TaskClass {
	/// Stable lowercase label for tracing fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Interactive => "interactive",
			Self::Background => "background",
		}
	}
}
