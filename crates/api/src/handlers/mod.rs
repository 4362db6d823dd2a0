pub mod admin;
pub mod city;
pub mod country;
