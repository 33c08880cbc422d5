mod test_call_sends_offer;
mod test_candidate_queue;
