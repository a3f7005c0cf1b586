mod countdown_timer_tests;
mod form_field_tests;
