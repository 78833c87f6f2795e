mod postgres_tests;
mod renderer_tests;
