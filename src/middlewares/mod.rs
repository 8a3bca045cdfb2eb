pub mod agent_middleware;
