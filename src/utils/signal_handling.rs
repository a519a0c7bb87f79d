use std::sync::atomic::{AtomicBool, Ordering};

use log::{info, warn};

static RECEIVED_CTRL_C: AtomicBool = AtomicBool::new(false);

/// Installs a Ctrl-C handler that only raises a flag; long running loops poll
/// [`received_ctrl_c`] and stop picking up new work.
pub fn initialize() {
    let res = ctrlc::set_handler(|| {
        if !RECEIVED_CTRL_C.swap(true, Ordering::SeqCst) {
            info!("Received Ctrl-C; finishing running tasks");
        }
    });

    if let Err(e) = res {
        warn!("Cannot install Ctrl-C handler: {e}");
    }
}

pub fn received_ctrl_c() -> bool {
    RECEIVED_CTRL_C.load(Ordering::Relaxed)
}
