// Crate entry point. Declares the module tree so the binary and the tests can reach it.
//
// Layout
// - shared: kernel types (claims, clock, errors, store error) and storage adapters.
// - modules: one folder per bounded context, split into core, use_cases and adapters.
// - shell: composition root (configuration, state, HTTP and GraphQL wiring, workers).

pub mod shared {
    pub mod core {
        pub mod claims;
        pub mod clock;
        pub mod errors;
        pub mod ports;
        pub mod time_window;
    }
    pub mod infrastructure {
        pub mod in_memory {
            pub mod directory;
            pub mod notifications;
            pub mod shifts;
            pub mod store;
            pub mod time_entries;
        }
        pub mod sqlite {
            pub mod directory;
            pub mod notifications;
            pub mod schema;
            pub mod shifts;
            pub mod store;
            pub mod time_entries;
        }
    }
}

pub mod modules {
    pub mod directory {
        pub mod core {
            pub mod ports;
        }
    }

    pub mod notifications {
        pub mod core {
            pub mod notification;
            pub mod ports;
        }
        pub mod use_cases {
            pub mod inbox {
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
        }
        pub mod adapters {
            pub mod outbound {
                pub mod channel_sink;
                pub mod recording_sink;
                pub mod relay;
            }
        }
    }

    pub mod time_entries {
        pub mod core {
            pub mod errors;
            pub mod intents;
            pub mod ports;
            pub mod time_entry;
        }
        pub mod use_cases {
            pub mod clock_in {
                pub mod command;
                pub mod decide;
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod clock_out {
                pub mod command;
                pub mod decide;
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod current_status {
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod backfill_durations {
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
        }
        pub mod adapters {
            pub mod inbound {
                pub mod graphql;
            }
            pub mod outbound {
                pub mod intent_dispatch;
            }
        }
    }

    pub mod shifts {
        pub mod core {
            pub mod errors;
            pub mod ports;
            pub mod shift;
        }
        pub mod use_cases {
            pub mod create_shift {
                pub mod command;
                pub mod decide;
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod assign_users {
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod delete_shift {
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod list_shifts {
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
        }
        pub mod adapters {
            pub mod inbound {
                pub mod graphql;
            }
        }
    }

    pub mod reporting {
        pub mod core {
            pub mod errors;
            pub mod report_window;
        }
        pub mod use_cases {
            pub mod get_timesheet {
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod get_summary_report {
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
        }
        pub mod adapters {
            pub mod inbound {
                pub mod graphql;
            }
        }
    }

    pub mod exceptions {
        pub mod core {
            pub mod views;
        }
        pub mod use_cases {
            pub mod check_missing_clockouts {
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod get_exceptions {
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
        }
        pub mod adapters {
            pub mod inbound {
                pub mod graphql;
            }
        }
    }
}

pub mod shell;
