//! Starcoin chain constants.

/// Address that hosts the Move standard library and framework modules.
pub const CORE_CODE_ADDRESS: &str = "0x00000000000000000000000000000001";

/// Short form of the genesis (system) account, as accepted by the node.
pub const GENESIS_ADDRESS: &str = "0x1";

/// Account addresses are 16 bytes.
pub const ACCOUNT_ADDRESS_LEN: usize = 16;

/// Access path data category for Move resources (as opposed to code).
pub const RESOURCE_TAG: u8 = 1;

/// Default JSON-RPC port of a Starcoin node.
pub const DEFAULT_RPC_PORT: u16 = 9850;

// =============================================================================
// Framework modules
// =============================================================================

pub const ACCOUNT_MODULE: &str = "Account";
pub const ACCOUNT_STRUCT: &str = "Account";
pub const BALANCE_STRUCT: &str = "Balance";
pub const BLOCK_REWARD_MODULE: &str = "BlockReward";
pub const REWARD_QUEUE_STRUCT: &str = "RewardQueue";
