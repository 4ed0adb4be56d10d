//! ABI bindings for the contracts the tools talk to.

use alloy::sol;

sol! {
    /// BNS registry: maps nodes to owners and resolvers.
    #[sol(rpc)]
    interface IBnsRegistry {
        function owner(bytes32 node) external view returns (address);
        function resolver(bytes32 node) external view returns (address);
    }

    /// Contract that publishes an IPNS record for a domain.
    #[sol(rpc)]
    interface IContentPublisher {
        function domain() external view returns (string memory);
        function ipnsRecord() external view returns (string memory);
    }

    /// Resolver that stores a node's contenthash.
    #[sol(rpc)]
    interface IContenthashResolver {
        function contenthash(bytes32 node) external view returns (bytes memory);
        function setContenthash(bytes32 node, bytes calldata hash) external;
    }
}
