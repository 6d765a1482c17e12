pub mod astar;
pub mod bfs;
pub mod dfs;
