pub mod bidding;
pub mod match_state;
pub mod protocol;
pub mod rejection;
pub mod round;
pub mod rules;
pub mod serialization;
pub mod settlement;
pub mod validator;
