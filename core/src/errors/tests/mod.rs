mod channel_error_tests;
