use tracing::error;

use crate::ui::tui;

/// Leaves the alternate screen before the panic report prints.
pub fn set_panic_hook() {
    let hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = tui::Tui::restore();
        error!(%panic_info, "panic");
        hook(panic_info);
    }));
}
