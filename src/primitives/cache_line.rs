/// A value padded out to its own cache line.
///
/// Adjacent lock stripes would otherwise share a line and every acquisition would bounce it
/// between the cores contending on unrelated cells.
#[cfg_attr(
    any(target_arch = "x86_64", target_arch = "aarch64"),
    repr(C, align(128))
)]
#[cfg_attr(
    not(any(target_arch = "x86_64", target_arch = "aarch64")),
    repr(C, align(64))
)]
pub struct CacheLineAligned<T>(pub T);
