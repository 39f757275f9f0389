// Tests for bootstrap intervals
