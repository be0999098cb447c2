mod helpers;

mod canteen_test;
mod cart_test;
mod checkout_test;
