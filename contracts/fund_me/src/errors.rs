use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum FundMeError {
    /// You need to spend more ETH!
    InsufficientContribution = 1,
    NotOwner = 2,
    /// Sweeping custody to the owner failed; the withdrawal is rolled back
    TransferFailed = 3,
    IndexOutOfRange = 4,
    /// The price feed answered zero or a negative price
    InvalidPrice = 5,
    ArithmeticOverflow = 6,
    NotInitialized = 7,
}
