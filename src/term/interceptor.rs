//! Raw VTE `Perform` implementation for sequences the high-level
//! `vte::ansi::Processor` drops.

use vte::Perform;

/// Intercepts OSC 7 (working-directory reports) from shell integration.
pub(super) struct CwdInterceptor<'a> {
    pub cwd: &'a mut Option<String>,
}

impl Perform for CwdInterceptor<'_> {
    fn osc_dispatch(&mut self, params: &[&[u8]], _bell_terminated: bool) {
        // OSC 7 — Current working directory.
        // Format: OSC 7 ; file://hostname/path ST
        if params.first() != Some(&&b"7"[..]) || params.len() < 2 {
            return;
        }
        let uri = std::str::from_utf8(params[1]).unwrap_or_default();
        // Strip file:// prefix and optional hostname to get the path.
        let path = uri.strip_prefix("file://").map_or(uri, |rest| {
            if let Some(slash) = rest.find('/') {
                rest.split_at(slash).1
            } else {
                rest
            }
        });
        if !path.is_empty() {
            *self.cwd = Some(path.to_owned());
        }
    }
}
