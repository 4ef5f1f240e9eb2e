//! Diesel schema for wallet and payment-method persistence.

diesel::table! {
    /// Project funding wallets, one per kind per project.
    wallets (project_provider, repo, kind) {
        /// Hosting provider of the owning project.
        #[max_length = 50]
        project_provider -> Varchar,
        /// Repository name of the owning project.
        #[max_length = 255]
        repo -> Varchar,
        /// Wallet kind.
        #[max_length = 50]
        kind -> Varchar,
        /// Wallet identifier (account number, address, ...).
        #[max_length = 255]
        identifier -> Varchar,
        /// Cash balance in minor currency units.
        balance -> BigInt,
        /// Whether this wallet is the project's active one.
        active -> Bool,
    }
}

diesel::table! {
    /// Payment methods attached to wallets.
    payment_methods (project_provider, repo, wallet_kind, identifier) {
        /// Hosting provider of the owning project.
        #[max_length = 50]
        project_provider -> Varchar,
        /// Repository name of the owning project.
        #[max_length = 255]
        repo -> Varchar,
        /// Kind of the owning wallet.
        #[max_length = 50]
        wallet_kind -> Varchar,
        /// Method identifier.
        #[max_length = 255]
        identifier -> Varchar,
        /// Whether this method is the wallet's active one.
        active -> Bool,
    }
}
