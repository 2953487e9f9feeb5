pub mod blowfish;
pub mod f_function;
pub mod key_schedule;
pub mod pi_tables;
