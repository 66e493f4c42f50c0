/// Fixed-size bitset over flat cell indices
pub mod bitset;
/// Public board operations and consistency checks
pub mod board;
/// Board transitions as values with a text form
pub mod operation;
/// Orphan discovery after a cost increase or loss
pub mod orphans;
/// Cheapest-first settlement of orphaned cells
pub mod reconvergence;
/// Breadth-first spreading of cost decreases
pub mod relaxation;
/// Lock-guarded board handle for concurrent readers
pub mod shared;
