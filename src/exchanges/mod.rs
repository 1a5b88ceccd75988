pub mod bittrex;
