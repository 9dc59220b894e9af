use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

use super::determinant::SquareMatrix;
use crate::error::MatrixError;

const VALUE_SIZE: usize = std::mem::size_of::<f64>();
const HEADER_SIZE: u64 = 2 * std::mem::size_of::<i32>() as u64;

/// Contents of one matrix file
#[derive(Debug, Clone)]
pub struct MatrixFile {
    pub path: PathBuf,
    /// Matrix count as written in the header
    pub declared_count: i32,
    pub order: usize,
    pub matrices: Vec<SquareMatrix>,
}

/// Read a native-endian `i32` count, an `i32` order, then every complete
/// `order * order` block of `f64` values.
pub fn read_matrix_file(path: &Path) -> Result<MatrixFile, MatrixError> {
    let path_str = path.display().to_string();

    let file = File::open(path).map_err(|source| MatrixError::Open {
        path: path_str.clone(),
        source,
    })?;
    let file_len = file
        .metadata()
        .map_err(|source| MatrixError::Open {
            path: path_str.clone(),
            source,
        })?
        .len();
    let mut reader = BufReader::new(file);

    let declared_count = read_i32(&mut reader).map_err(|source| MatrixError::Header {
        path: path_str.clone(),
        source,
    })?;
    let order = read_i32(&mut reader).map_err(|source| MatrixError::Header {
        path: path_str.clone(),
        source,
    })?;

    if declared_count < 0 || order <= 0 {
        return Err(MatrixError::InvalidHeader {
            path: path_str,
            count: declared_count,
            order,
        });
    }

    let order = order as usize;
    let invalid = || MatrixError::InvalidHeader {
        path: path_str.clone(),
        count: declared_count,
        order: order as i32,
    };
    let block_len = order
        .checked_mul(order)
        .and_then(|cells| cells.checked_mul(VALUE_SIZE))
        .ok_or_else(invalid)?;

    // A block larger than the file body cannot hold even one matrix
    let body_len = file_len.saturating_sub(HEADER_SIZE);
    if u64::try_from(block_len).map_or(true, |len| len > body_len) {
        if declared_count > 0 {
            return Err(invalid());
        }
        return Ok(MatrixFile {
            path: path.to_path_buf(),
            declared_count,
            order,
            matrices: Vec::new(),
        });
    }

    let mut block: Vec<u8> = Vec::new();
    block.try_reserve_exact(block_len).map_err(|_| invalid())?;
    block.resize(block_len, 0);
    let mut matrices = Vec::new();

    loop {
        let filled = read_full(&mut reader, &mut block).map_err(|source| MatrixError::Io {
            path: path_str.clone(),
            source,
        })?;

        if filled < block_len {
            if filled > 0 {
                tracing::debug!("{}: ignoring trailing {} bytes of a partial matrix", path_str, filled);
            }
            break;
        }

        let values = block
            .chunks_exact(VALUE_SIZE)
            .map(|bytes| {
                let mut raw = [0u8; VALUE_SIZE];
                raw.copy_from_slice(bytes);
                f64::from_ne_bytes(raw)
            })
            .collect();

        if let Some(matrix) = SquareMatrix::from_row_major(order, values) {
            matrices.push(matrix);
        }
    }

    if matrices.len() != declared_count as usize {
        tracing::warn!(
            "{}: header declares {} matrices but {} complete ones were read",
            path_str,
            declared_count,
            matrices.len()
        );
    }

    Ok(MatrixFile {
        path: path.to_path_buf(),
        declared_count,
        order,
        matrices,
    })
}

fn read_i32<R: Read>(reader: &mut R) -> io::Result<i32> {
    let mut raw = [0u8; 4];
    reader.read_exact(&mut raw)?;
    Ok(i32::from_ne_bytes(raw))
}

/// Fill `buf` unless EOF comes first; returns the bytes read.
fn read_full<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
