/// Resources the pipeline touches, at the granularity the host's graph
/// executor tracks dependencies at.
///
/// `RawDepth` and `RawNormals` are externally owned and read-only here; the
/// rest live for a single [`crate::Engine::record()`] call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resource {
    RawDepth,
    RawNormals,
    DepthPyramid,
    AoTerm,
    AoTermPong,
    Edges,
    FinalAoTerm,
    AoFinal,
}

/// Read/write-intent registration against the host's graph executor.
///
/// The recorder declares every access in submission order and relies on the
/// executor to insert whatever synchronization the backend needs - it places
/// no barriers itself.
pub trait FrameGraph {
    fn declare_read(&mut self, resource: Resource);
    fn declare_write(&mut self, resource: Resource);
}

/// Hosts whose graphics API already tracks hazards within a queue (wgpu
/// does) can pass `&mut ()` and skip registration altogether.
impl FrameGraph for () {
    fn declare_read(&mut self, _: Resource) {}

    fn declare_write(&mut self, _: Resource) {}
}
