/// What the frame loop should do after a failed surface acquire.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// Surface was reconfigured; rendering resumes next frame.
    Reconfigured,
    /// Transient error; skip this frame.
    SkipFrame,
    /// Unrecoverable (out of memory); exit the loop.
    Fatal,
}
