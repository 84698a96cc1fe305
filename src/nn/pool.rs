//! Resolution of operand data locations inside request memory pools.

use std::ops::Range;

use crate::error::LayoutError;

/// Where an operand's bytes live: a pool index plus a byte range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct DataLocation {
    pub pool_index: usize,
    pub offset: usize,
    pub length: usize,
}

fn check_pool_index(location: &DataLocation, pools: usize) -> Result<(), LayoutError> {
    if location.pool_index >= pools {
        return Err(LayoutError::PoolIndexOutOfRange {
            index: location.pool_index,
            pools,
        });
    }
    Ok(())
}

fn check_range(location: &DataLocation, pool_size: usize) -> Result<Range<usize>, LayoutError> {
    match location.offset.checked_add(location.length) {
        Some(end) if end <= pool_size => Ok(location.offset..end),
        _ => Err(LayoutError::PoolRangeOutOfBounds {
            offset: location.offset,
            length: location.length,
            pool_size,
        }),
    }
}

/// Borrow the bytes at `location`.
pub fn memory_from_pool<'a, P: AsRef<[u8]>>(
    location: &DataLocation,
    pools: &'a [P],
) -> Result<&'a [u8], LayoutError> {
    check_pool_index(location, pools.len())?;
    let pool = pools[location.pool_index].as_ref();
    let range = check_range(location, pool.len())?;
    Ok(&pool[range])
}

/// Mutably borrow the bytes at `location`, e.g. to write a request output.
pub fn memory_from_pool_mut<'a, P: AsMut<[u8]>>(
    location: &DataLocation,
    pools: &'a mut [P],
) -> Result<&'a mut [u8], LayoutError> {
    check_pool_index(location, pools.len())?;
    let pool = pools[location.pool_index].as_mut();
    let range = check_range(location, pool.len())?;
    Ok(&mut pool[range])
}
