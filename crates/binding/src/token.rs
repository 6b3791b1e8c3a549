//! Token contract bindings.

use alloy_sol_types::sol;

sol! {
    /// ERC20 token interface extended with the holder-addressed `burn` entry point
    /// exposed by the deployed token.
    #[sol(rpc)]
    interface IERC20 {
        /// Emitted when tokens are transferred (including burns, with `to` = 0x0)
        event Transfer(
            address indexed from,
            address indexed to,
            uint256 value
        );

        /// Emitted when an allowance is set
        event Approval(
            address indexed owner,
            address indexed spender,
            uint256 value
        );

        /// Get token name
        function name() external view returns (string memory);

        /// Get token symbol
        function symbol() external view returns (string memory);

        /// Get token decimals
        function decimals() external view returns (uint8);

        /// Get total supply
        function totalSupply() external view returns (uint256);

        /// Get token balance of an account
        function balanceOf(address account) external view returns (uint256);

        /// Get allowance granted by owner to spender
        function allowance(address owner, address spender) external view returns (uint256);

        /// Transfer tokens to recipient
        function transfer(address recipient, uint256 amount) external returns (bool);

        /// Approve spender to spend tokens
        function approve(address spender, uint256 amount) external returns (bool);

        /// Destroy `amount` tokens held by `account`
        function burn(address account, uint256 amount) external;
    }
}
