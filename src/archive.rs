//! gzip-compressed tar of the output directory.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use flate2::write::GzEncoder;
use flate2::Compression;
use tar::Builder;

use crate::error::{Error, Result};

/// Packs `source_dir` into `dest` under the source directory's own name.
///
/// `dest` may live inside `source_dir`; it is left out of the archive.
pub fn create_tar_gz(source_dir: &Path, dest: &Path) -> Result<()> {
    write_archive(source_dir, dest).map_err(|source| Error::Archive {
        path: dest.to_path_buf(),
        source,
    })
}

fn write_archive(source_dir: &Path, dest: &Path) -> io::Result<()> {
    let root = archive_root(source_dir);

    let file = BufWriter::new(File::create(dest)?);
    let mut builder = Builder::new(GzEncoder::new(file, Compression::default()));

    builder.append_dir(&root, source_dir)?;
    append_tree(&mut builder, source_dir, &root, dest)?;

    let mut file = builder.into_inner()?.finish()?;
    file.flush()
}

fn archive_root(source_dir: &Path) -> PathBuf {
    source_dir
        .file_name()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("output"))
}

fn append_tree<W: Write>(
    builder: &mut Builder<W>,
    dir: &Path,
    prefix: &Path,
    skip: &Path,
) -> io::Result<()> {
    let mut entries = fs::read_dir(dir)?.collect::<io::Result<Vec<_>>>()?;
    entries.sort_by_key(|e| e.file_name());

    for entry in entries {
        let path = entry.path();
        if path == skip {
            continue;
        }
        let name = prefix.join(entry.file_name());
        let file_type = entry.file_type()?;

        if file_type.is_dir() {
            builder.append_dir(&name, &path)?;
            append_tree(builder, &path, &name, skip)?;
        } else {
            builder.append_path_with_name(&path, &name)?;
        }
    }

    Ok(())
}
