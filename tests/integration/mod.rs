/// Integration test target: tool invocation and the JSON-RPC server
mod basic_integration;
