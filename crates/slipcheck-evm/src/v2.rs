//! Router-v2 swaps: `address[]` path, flat argument list.
//!
//! Two layouts are in use:
//! - token-in: `(uint256 amount, uint256 limit, address[] path, address to, uint256 deadline)`
//! - ETH-in:   `(uint256 amount, address[] path, address to, uint256 deadline)`
//!
//! For ETH-in calls the missing amount travels as `msg.value`. Whether the
//! single calldata amount is the specified amount or the bound depends on
//! the trade direction.

use alloy_primitives::Address;
use slipcheck_core::{DecodeError, DecodedSwap, SimpleSwap, SwapFunction, TradeDirection};

use crate::abi::{WordReader, WORD};

/// Fewest tokens a v2 path can hold.
pub const MIN_PATH_LEN: usize = 2;

/// Decode the five-argument token-in layout.
pub fn decode_token_in(function: SwapFunction, args: &[u8]) -> Result<DecodedSwap, DecodeError> {
    let r = WordReader::new(args);
    let amount = r.uint(head_pos(0))?;
    let limit = r.uint(head_pos(1))?;
    let path_offset = r.offset(head_pos(2))?;
    let recipient = r.address(head_pos(3))?;
    let deadline = r.uint(head_pos(4))?;
    let path = read_path(&r, path_offset)?;

    Ok(DecodedSwap::Simple(SimpleSwap {
        function,
        direction: function.direction(),
        amount_specified: Some(amount),
        amount_limit: Some(limit),
        path,
        recipient,
        deadline,
    }))
}

/// Decode the four-argument ETH-in layout.
pub fn decode_eth_in(function: SwapFunction, args: &[u8]) -> Result<DecodedSwap, DecodeError> {
    let r = WordReader::new(args);
    let amount = r.uint(head_pos(0))?;
    let path_offset = r.offset(head_pos(1))?;
    let recipient = r.address(head_pos(2))?;
    let deadline = r.uint(head_pos(3))?;
    let path = read_path(&r, path_offset)?;

    let direction = function.direction();
    let (amount_specified, amount_limit) = match direction {
        TradeDirection::ExactInput => (None, Some(amount)),
        TradeDirection::ExactOutput => (Some(amount), None),
    };

    Ok(DecodedSwap::Simple(SimpleSwap {
        function,
        direction,
        amount_specified,
        amount_limit,
        path,
        recipient,
        deadline,
    }))
}

/// Byte position of the `index`-th top-level argument.
fn head_pos(index: usize) -> usize {
    index * WORD
}

fn read_path(r: &WordReader<'_>, offset: usize) -> Result<Vec<Address>, DecodeError> {
    let path = r.address_array_at(offset)?;
    if path.len() < MIN_PATH_LEN {
        return Err(DecodeError::MalformedPath {
            reason: format!("path has {} token(s), need at least {MIN_PATH_LEN}", path.len()),
        });
    }
    Ok(path)
}
