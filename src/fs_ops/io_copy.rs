//! Streaming copy used by the cross-device fallback.
//!
//! - The destination is created with `create_new`, so an existing file is never clobbered.
//! - Buffered I/O with 1 MiB buffers.
//! - The destination is fsynced before returning; callers sync the directory after rename.
//!
//! The source is read once from start to EOF. Callers compare the returned byte
//! count with the source length to detect a file that changed underneath them.

use std::fs::{File, OpenOptions};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

const BUF_SIZE: usize = 1024 * 1024;

/// Copy `src` -> `dst` (which must not exist) and fsync `dst`. Returns bytes written.
pub(super) fn copy_streaming(src: &Path, dst: &Path) -> io::Result<u64> {
    let src_f = File::open(src)?;
    let dst_f = OpenOptions::new().write(true).create_new(true).open(dst)?;

    let mut reader = BufReader::with_capacity(BUF_SIZE, src_f);
    let mut writer = BufWriter::with_capacity(BUF_SIZE, dst_f);
    let bytes = io::copy(&mut reader, &mut writer)?;
    writer.flush()?;
    writer.get_ref().sync_all()?;
    Ok(bytes)
}
