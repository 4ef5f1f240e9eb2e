//! Application services for wallet and payment-method management.

mod treasury;

pub use treasury::{
    BillingError, BillingResult, BillingService, RegisterPaymentMethodRequest,
    RegisterWalletRequest,
};
