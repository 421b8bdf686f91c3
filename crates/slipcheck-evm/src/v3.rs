//! Router-v3 `exactInput` / `exactOutput`.
//!
//! Both take a single dynamic struct
//! `(bytes path, address recipient, uint256 deadline, uint256 amount, uint256 limit)`.
//! Word 0 of the arguments is the struct offset; inside the struct the path
//! offset is relative to the struct start. The path itself is packed as
//! `token(20) [fee(3) token(20)]*`.

use alloy_primitives::Address;
use slipcheck_core::{DecodeError, DecodedSwap, EncodedPath, PathEncodedSwap, SwapFunction};

use crate::abi::{WordReader, WORD};

pub const ADDRESS_LEN: usize = 20;
pub const FEE_LEN: usize = 3;
/// One `fee token` step of the packed path.
pub const HOP_LEN: usize = FEE_LEN + ADDRESS_LEN;

pub fn decode_exact(function: SwapFunction, args: &[u8]) -> Result<DecodedSwap, DecodeError> {
    let r = WordReader::new(args);
    let base = r.offset(0)?;
    let path_offset = r.offset(head(base, 0))?;
    let recipient = r.address(head(base, 1))?;
    let deadline = r.uint(head(base, 2))?;
    let amount_specified = r.uint(head(base, 3))?;
    let amount_limit = r.uint(head(base, 4))?;
    let packed = r.bytes_at(base, path_offset)?;
    let path = parse_packed_path(packed)?;

    Ok(DecodedSwap::PathEncoded(PathEncodedSwap {
        function,
        direction: function.direction(),
        amount_specified,
        amount_limit,
        path,
        recipient,
        deadline,
    }))
}

/// Split a packed v3 path into tokens and fee tiers.
///
/// Valid lengths are `20 + 23 * k` with `k >= 1`.
pub fn parse_packed_path(bytes: &[u8]) -> Result<EncodedPath, DecodeError> {
    let len = bytes.len();
    if len < ADDRESS_LEN + HOP_LEN || (len - ADDRESS_LEN) % HOP_LEN != 0 {
        return Err(DecodeError::MalformedPath {
            reason: format!("path is {len} bytes, expected 20 + 23*k with k >= 1"),
        });
    }

    let (first, rest) = bytes.split_at(ADDRESS_LEN);
    let mut tokens = vec![Address::from_slice(first)];
    let mut fees = Vec::with_capacity(rest.len() / HOP_LEN);
    for hop in rest.chunks_exact(HOP_LEN) {
        let (fee, token) = hop.split_at(FEE_LEN);
        fees.push(u32::from_be_bytes([0, fee[0], fee[1], fee[2]]));
        tokens.push(Address::from_slice(token));
    }
    Ok(EncodedPath { tokens, fees })
}

/// Byte position of the `index`-th struct field when the struct starts at `base`.
fn head(base: usize, index: usize) -> usize {
    base.saturating_add(index.saturating_mul(WORD))
}
