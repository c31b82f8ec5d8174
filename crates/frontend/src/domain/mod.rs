pub mod a001_restaurant_profile;
