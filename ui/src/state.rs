use usertable_business::{BusinessConfig, controller};
use usertable_states::StateCtx;

use crate::widgets::ControlsInput;

/// The main application state.
pub struct State {
    /// The state context for business logic.
    pub ctx: StateCtx,
}

impl Default for State {
    fn default() -> Self {
        Self::with_config(default_config())
    }
}

impl State {
    pub fn test(base_url: String) -> Self {
        Self::with_config(BusinessConfig::new(base_url))
    }

    fn with_config(config: BusinessConfig) -> Self {
        let mut ctx = StateCtx::new();

        controller::register(&mut ctx, config);
        ctx.add_state(ControlsInput::default());

        Self { ctx }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn default_config() -> BusinessConfig {
    BusinessConfig::from_env()
}

#[cfg(target_arch = "wasm32")]
fn default_config() -> BusinessConfig {
    BusinessConfig::default()
}
