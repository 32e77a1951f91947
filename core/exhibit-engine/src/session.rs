//! FILENAME: core/exhibit-engine/src/session.rs
//! PURPOSE: Scoped ownership of a host application session.
//! CONTEXT: Opening a session silences host alerts. The host is released
//! exactly once, either through `close` (which reports the error) or on drop
//! (which can only log it).

use engine::{HostError, SessionHost};

use crate::logging::{log_debug, log_warn};

pub struct HostSession<H: SessionHost> {
    host: H,
    released: bool,
}

impl<H: SessionHost> HostSession<H> {
    pub fn open(mut host: H) -> Self {
        host.set_display_alerts(false);
        log_debug!("SESSION", "opened, alerts off");
        HostSession { host, released: false }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Releases the host now and reports the outcome.
    pub fn close(mut self) -> Result<(), HostError> {
        self.released = true;
        self.host.release()
    }
}

impl<H: SessionHost> Drop for HostSession<H> {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        if let Err(e) = self.host.release() {
            log_warn!("SESSION", "release on drop failed: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine::{GridSurface, Workbook};

    #[test]
    fn test_open_silences_alerts() {
        let mut wb = Workbook::new();
        let session = HostSession::open(&mut wb);
        assert!(!session.host().display_alerts());
        session.close().unwrap();
        assert!(wb.is_closed());
    }

    #[test]
    fn test_drop_releases() {
        let mut wb = Workbook::new();
        {
            let mut session = HostSession::open(&mut wb);
            session.host_mut().get_or_create_sheet("Scratch").unwrap();
        }
        assert!(wb.is_closed());
        assert!(wb.display_alerts());
    }

    #[test]
    fn test_session_host_writes_reach_workbook() {
        let mut wb = Workbook::new();
        let mut session = HostSession::open(&mut wb);
        let sheet = session.host_mut().get_or_create_sheet("Scratch").unwrap();
        assert_eq!(session.host().sheet(sheet).unwrap().name, "Scratch");
        session.close().unwrap();
    }
}
