use alloy_sol_types::sol;

sol! {
    /// The pool contract. Pricing and reserve accounting happen on chain.
    interface IDex {
        function calculateEthToToken(uint256 ethAmount) external view returns (uint256 tokenAmount);
        function calculateTokenToEth(uint256 tokenAmount) external view returns (uint256 ethAmount);
        function calculateRequiredEthForLiquidity(uint256 tokenAmount) external view returns (uint256 ethAmount);

        function swapEthToToken() external payable;
        function swapTokenToEth(uint256 tokenAmount) external;

        function addLiquidity(uint256 tokenAmount) external payable;
        function removeLiquidity(uint256 liquidity) external;
    }

    interface IERC20 {
        function balanceOf(address owner) external view returns (uint256 balance);
        function allowance(address owner, address spender) external view returns (uint256 remaining);
        function approve(address spender, uint256 amount) external returns (bool success);
    }
}
