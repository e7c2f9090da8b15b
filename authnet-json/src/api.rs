//! Supported Authorize.Net API calls.
//!
//! Every request to the JSON endpoint is keyed by the name of the API call. [`ApiCall`]
//! enumerates the names this client knows how to send; [`AuthnetClient::invoke`] takes one
//! of them together with the call parameters.
//!
//! [`AuthnetClient::invoke`]: crate::AuthnetClient::invoke

use std::{fmt, str::FromStr};

use crate::error::AuthnetError;

macro_rules! api_calls {
    ($($(#[$doc:meta])* $variant:ident => $wire:literal,)+) => {
        /// An Authorize.Net API call name.
        ///
        /// # Examples
        ///
        /// ```
        /// use authnet_json::ApiCall;
        ///
        /// let call: ApiCall = "createTransactionRequest".parse().unwrap();
        /// assert_eq!(call, ApiCall::CreateTransaction);
        /// assert_eq!(call.as_str(), "createTransactionRequest");
        /// ```
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[non_exhaustive]
        pub enum ApiCall {
            $($(#[$doc])* $variant,)+
        }

        impl ApiCall {
            /// Every supported API call.
            pub const ALL: &'static [Self] = &[$(Self::$variant,)+];

            /// Returns the name used as the top-level key of the request envelope.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $wire,)+
                }
            }
        }

        impl FromStr for ApiCall {
            type Err = AuthnetError;

            fn from_str(name: &str) -> Result<Self, Self::Err> {
                match name {
                    $($wire => Ok(Self::$variant),)+
                    _ => Err(AuthnetError::InvalidParameters(format!("unknown API call: {name}"))),
                }
            }
        }
    };
}

api_calls! {
    /// Test the API login ID and transaction key.
    AuthenticateTest => "authenticateTestRequest",
    /// Process a payment.
    CreateTransaction => "createTransactionRequest",
    /// Approve or decline a transaction held by fraud filters.
    UpdateHeldTransaction => "updateHeldTransactionRequest",
    /// Email a receipt for a transaction.
    SendCustomerTransactionReceipt => "sendCustomerTransactionReceiptRequest",
    /// Update a split tender transaction.
    UpdateSplitTenderGroup => "updateSplitTenderGroupRequest",
    /// Decrypt Visa Checkout data.
    DecryptPaymentData => "decryptPaymentDataRequest",
    /// Cancel a subscription.
    ArbCancelSubscription => "ARBCancelSubscriptionRequest",
    /// Create a subscription.
    ArbCreateSubscription => "ARBCreateSubscriptionRequest",
    /// Get a subscription.
    ArbGetSubscription => "ARBGetSubscriptionRequest",
    /// Get a list of subscriptions.
    ArbGetSubscriptionList => "ARBGetSubscriptionListRequest",
    /// Get a subscription's status.
    ArbGetSubscriptionStatus => "ARBGetSubscriptionStatusRequest",
    /// Update a subscription.
    ArbUpdateSubscription => "ARBUpdateSubscriptionRequest",
    /// Create a payment profile.
    CreateCustomerPaymentProfile => "createCustomerPaymentProfileRequest",
    /// Create a customer profile.
    CreateCustomerProfile => "createCustomerProfileRequest",
    /// Create a customer profile from a successful transaction.
    CreateCustomerProfileFromTransaction => "createCustomerProfileFromTransactionRequest",
    /// Process a transaction against a customer profile.
    CreateCustomerProfileTransaction => "createCustomerProfileTransactionRequest",
    /// Create a shipping profile.
    CreateCustomerShippingAddress => "createCustomerShippingAddressRequest",
    /// Delete a payment profile.
    DeleteCustomerPaymentProfile => "deleteCustomerPaymentProfileRequest",
    /// Delete a customer profile.
    DeleteCustomerProfile => "deleteCustomerProfileRequest",
    /// Delete a shipping profile.
    DeleteCustomerShippingAddress => "deleteCustomerShippingAddressRequest",
    /// Retrieve a payment profile.
    GetCustomerPaymentProfile => "getCustomerPaymentProfileRequest",
    /// Retrieve a list of payment profiles.
    GetCustomerPaymentProfileList => "getCustomerPaymentProfileListRequest",
    /// Retrieve a list of profile IDs.
    GetCustomerProfileIds => "getCustomerProfileIdsRequest",
    /// Retrieve a customer profile.
    GetCustomerProfile => "getCustomerProfileRequest",
    /// Retrieve a shipping address.
    GetCustomerShippingAddress => "getCustomerShippingAddressRequest",
    /// Retrieve a hosted profile page token.
    GetHostedProfilePage => "getHostedProfilePageRequest",
    /// Retrieve a hosted payment page token.
    GetHostedPaymentPage => "getHostedPaymentPageRequest",
    /// Update a payment profile.
    UpdateCustomerPaymentProfile => "updateCustomerPaymentProfileRequest",
    /// Update a customer profile.
    UpdateCustomerProfile => "updateCustomerProfileRequest",
    /// Update a shipping address.
    UpdateCustomerShippingAddress => "updateCustomerShippingAddressRequest",
    /// Validate a payment profile.
    ValidateCustomerPaymentProfile => "validateCustomerPaymentProfileRequest",
    /// Get a summary of a settled batch.
    GetBatchStatistics => "getBatchStatisticsRequest",
    /// Get a list of settled batches.
    GetSettledBatchList => "getSettledBatchListRequest",
    /// Get the details of a transaction.
    GetTransactionDetails => "getTransactionDetailsRequest",
    /// Get a list of transactions in a batch.
    GetTransactionList => "getTransactionListRequest",
    /// Get a list of transactions for a customer profile.
    GetTransactionListForCustomer => "getTransactionListForCustomerRequest",
    /// Get a list of unsettled transactions.
    GetUnsettledTransactionList => "getUnsettledTransactionListRequest",
    /// Get merchant account details.
    GetMerchantDetails => "getMerchantDetailsRequest",
}

impl fmt::Display for ApiCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
