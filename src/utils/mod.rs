pub mod maths_utils;
