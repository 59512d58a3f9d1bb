//! Solidity bindings of the deployed contracts

use alloy::sol;

sol! {
    /// Constructor binding of the MCCB token
    contract MccbToken {
        constructor(uint256 initialSupply);
    }
}
