// Integration tests that exercise the library from CSV input to interval

mod end_to_end;
